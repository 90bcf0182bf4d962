pub mod config;
pub mod events;
pub mod stage;

pub mod gui {
    pub mod app;
    pub mod assets;
    pub mod clock;
    pub mod theme;
    pub mod wheel;
}

pub mod sys {
    pub mod runtime;
    pub mod server;
}
