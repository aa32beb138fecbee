#![allow(dead_code)]

use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes a script of `rounds` rounds, each betting 10, crossing level 1 and cashing out.
pub fn generate_script(path: &Path, rounds: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["action", "value"])?;

    for _ in 0..rounds {
        wtr.write_record(["start", "10"])?;
        wtr.write_record(["choose", "left"])?;
        wtr.write_record(["cashout", ""])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes an arbitrary list of `(action, value)` rows.
pub fn write_script(path: &Path, rows: &[(&str, &str)]) -> Result<(), Error> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["action", "value"])?;
    for (action, value) in rows {
        wtr.write_record([*action, *value])?;
    }
    wtr.flush()?;
    Ok(())
}
