//! Use case implementations.

mod rehost_images_use_case;

pub use rehost_images_use_case::RehostImagesUseCase;
