pub mod composer;
pub mod dto;
pub mod model;
pub mod params;
pub mod service;
