//! Terminal UI: the interactive game loop, the falling-piece animation, and
//! frame rendering including the end-of-game popup.

mod animation;
mod app;
pub mod game_view;

pub use animation::DropAnimation;
pub use app::App;
