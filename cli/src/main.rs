use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    siteaudit_cli::run().await
}
