/// Entity simulation core for a frame-stepped arcade shooter.
///
/// The library is the whole game minus I/O: the binary (or any other
/// presentation layer) feeds `Session::advance` one frame of intents and an
/// RNG, and renders the returned `FrameResult` snapshot.  No file, terminal,
/// or network access happens anywhere in these modules.

pub mod abilities;
pub mod collision;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod registry;
pub mod session;
