pub mod file_record_store;
pub mod hashmap_check_store;
pub mod hashmap_user_store;

pub use file_record_store::FileRecordStore;
pub use hashmap_check_store::HashMapCheckStore;
pub use hashmap_user_store::HashMapUserStore;
