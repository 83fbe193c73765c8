pub mod chart_scene;
pub mod playback;
pub mod setup_scene;
