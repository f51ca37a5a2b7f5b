mod helpers;
mod historical;
mod station;
