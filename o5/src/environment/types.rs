use o5_client::ContactApiServiceImpl;
use o5_core_contact_impl::ContactFeatureServiceImpl;
use o5_persistence_postgres::{contact::PostgresContactRepository, PostgresDatabase};

// API
pub type RestServer = o5_api_rest::RestServer<ContactFeature>;

// Persistence
pub type Database = PostgresDatabase;
pub type ContactRepo = PostgresContactRepository;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Database, ContactRepo>;

// Client
pub type ContactApi = ContactApiServiceImpl;
