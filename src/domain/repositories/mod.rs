//! Repository traits abstracting the backing store.

mod click_repository;
mod mapping_repository;

pub use click_repository::ClickRepository;
pub use mapping_repository::MappingRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
