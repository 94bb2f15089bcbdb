use std::sync::Arc;

use insta::assert_snapshot;
use statline::app::App;
use statline::config::Settings;
use statline::interrupt::Control;
use statline::system::collector::StatSelection;
use statline::system::mock::ScriptedProvider;
use statline::system::provider::StatProvider;
use statline::ui::DisplayMode;
use statline::ui::banner::write_banner;
use tokio::sync::watch;

#[tokio::test]
async fn sequential_system_only() {
    let settings = Settings {
        samples: 2,
        delay_secs: 0,
        mode: DisplayMode::Sequential,
        graphics: false,
        stats: StatSelection {
            system: true,
            user: false,
        },
    };
    let (_control_tx, control_rx) = watch::channel(Control::default());
    let mut app = App::new(
        Arc::new(ScriptedProvider::constant()),
        settings,
        Vec::new(),
        control_rx,
    );
    app.run().await.unwrap();
    let out = String::from_utf8(app.into_output()).unwrap();

    assert_snapshot!("sequential_system_only", out);
}

#[test]
fn closing_banner() {
    let mut out = Vec::new();
    write_banner(&mut out, &ScriptedProvider::constant().banner()).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert_snapshot!("closing_banner", out);
}
