pub mod contact_body;
pub mod user_agent;
