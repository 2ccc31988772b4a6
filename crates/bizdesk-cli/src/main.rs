//! Binary entrypoint for the Bizdesk CLI.

#[tokio::main]
async fn main() {
    let exit_code = bizdesk_cli::run().await;
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
