/// Build information line
pub fn build_info() -> String {
    format!("notepic {}", env!("CARGO_PKG_VERSION"))
}

/// Execute the version command
pub fn execute() {
    println!("{}", build_info());
}
