pub mod supabase_provisioning_gateway;

pub use supabase_provisioning_gateway::SupabaseProvisioningGateway;
