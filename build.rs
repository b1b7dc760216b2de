const COMMANDS: &[&str] = &["setup_connection", "list_available_products", "launch_purchase"];

fn main() {
    tauri_plugin::Builder::new(COMMANDS)
        .android_path("android")
        .build();
}
