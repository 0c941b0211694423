use grammarlint_core::kinds::NodeKind;

/// Run `grammarlint kinds` -- list every node kind a check can subscribe to.
pub fn run(json: bool) -> i32 {
    if json {
        let kinds: Vec<serde_json::Value> = NodeKind::ALL
            .iter()
            .map(|k| serde_json::json!({ "id": k.id(), "name": k.name() }))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&kinds).unwrap_or_default()
        );
    } else {
        for kind in NodeKind::ALL {
            println!("{:>3}  {}", kind.id(), kind.name());
        }
    }
    0
}
