//! Core interfaces for the Cursus service
//!
//! Defines the repository and service contracts that enable dependency
//! injection and testing. Handlers depend on these traits, never on the
//! SeaORM implementations directly.

pub mod auth;
pub mod database;
pub mod email;

pub use auth::{AuthProvider, UnconfiguredAuthProvider};
pub use database::{
    ActivityFilters, ActivityRepository, DatabaseError, ExtranetAccessFilters,
    ExtranetAccessRepository, FonctionChanges, FonctionFilters, FonctionRepository, NewActivity,
    NewExtranetAccess, NewFonction, NewRoom, OrganizationRepository, Repository,
    RepositoryFactory, RoomChanges, RoomFilters, RoomRepository, UserRepository,
};
pub use email::{EmailError, EmailMessage, EmailService};
