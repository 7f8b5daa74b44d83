// Infrastructure: everything that talks to the outside world
// (the REST backend and local persistence)

pub mod api;
pub mod storage;
