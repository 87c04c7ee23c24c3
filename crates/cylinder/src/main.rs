use cylinder::config;
use cylinder::gui::app::AppModel;
use cylinder::gui::cylinder::State;
use cylinder::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = config::load_or_setup();
    let state = State::from_config(config);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.troia.cylinder");

    app.run::<AppModel>((state, rx));
}
