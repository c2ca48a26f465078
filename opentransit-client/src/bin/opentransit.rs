use clap::Parser;
use opentransit_client::app::OpenTransitCliArguments;

fn main() {
    env_logger::init();
    let args = OpenTransitCliArguments::parse();
    match args.run() {
        Ok(_) => log::info!("finished."),
        Err(e) => {
            log::error!("failed running opentransit: {e}");
            std::process::exit(1);
        }
    }
}
