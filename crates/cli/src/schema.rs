use kinemeter_api::NetworkSnapshot;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("NetworkSnapshot JSON Interface Specification:");
    println!("=============================================");
    println!("load_total / capacity_total are estimates; approximate is always true.");
    println!("ratio = load_total / capacity_total (0 when capacity_total is 0).\n");

    let schema = schemars::schema_for!(NetworkSnapshot);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
