pub mod listing;

pub mod resolver;

pub mod slug;

pub mod snapshot;

pub mod timer;
