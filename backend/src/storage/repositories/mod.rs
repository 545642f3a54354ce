// Repository modules
pub mod fee_config_repository;
pub mod legacy_fee_repository;
pub mod student_directory;
pub mod student_fee_repository;

// Re-export repository types
pub use fee_config_repository::FeeConfigRepository;
pub use legacy_fee_repository::LegacyFeeRepository;
pub use student_directory::DocumentStudentDirectory;
pub use student_fee_repository::StudentFeeRepository;
