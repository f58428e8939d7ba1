pub mod drag;
