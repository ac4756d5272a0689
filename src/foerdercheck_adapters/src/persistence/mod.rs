pub mod hashmap_eligibility_record_store;
pub mod hashset_verified_email_registry;
pub mod postgres_eligibility_record_store;
pub mod redis_verified_email_registry;

pub use hashmap_eligibility_record_store::HashMapEligibilityRecordStore;
pub use hashset_verified_email_registry::HashSetVerifiedEmailRegistry;
pub use postgres_eligibility_record_store::PostgresEligibilityRecordStore;
pub use redis_verified_email_registry::RedisVerifiedEmailRegistry;
