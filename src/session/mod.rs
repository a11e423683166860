pub mod credentials;

pub mod manager;
