mod common;

#[test]
fn test_generate_simple_script() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("generated.csv");
    common::generate_script(&output_path, 5).expect("Failed to generate script");

    let content = std::fs::read_to_string(&output_path).expect("Failed to read file");
    // Header + 3 rows per round
    assert_eq!(content.lines().count(), 16);
}

#[test]
fn test_generated_script_is_readable() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("generated.csv");
    common::generate_script(&output_path, 3).expect("Failed to generate script");

    let file = std::fs::File::open(&output_path).unwrap();
    let reader = glassbridge::interfaces::csv::action_reader::ActionReader::new(file);
    let actions: Vec<_> = reader.actions().collect();

    assert_eq!(actions.len(), 9);
    assert!(actions.iter().all(|action| action.is_ok()));
}
