pub mod coordinator;
mod handlers;
pub mod recent_files;
pub mod settings;
pub mod shortcuts;

#[cfg(test)]
mod test_support;
