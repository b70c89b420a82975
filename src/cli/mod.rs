pub mod history;
pub mod live;
pub mod setup;
pub mod snapshot;
pub mod ui;
pub mod zodiac;
