use std::process::exit;

#[tokio::main]
async fn main() {
    if let Err(err) = movieverse::app::run().await {
        eprintln!("error: {err}");
        exit(1);
    }
}
