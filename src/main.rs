#[tokio::main]
async fn main() {
    networth::init_tracing();

    if let Err(e) = networth::api::run_cli().await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
