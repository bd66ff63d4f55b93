use tracing::Level;

// Init logging, ignore error if already set
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_line_number(true)
        .with_file(true)
        .with_max_level(Level::DEBUG)
        .try_init();
}
