pub mod activities;
pub mod extranet_accesses;
pub mod fonctions;
pub mod organizations;
pub mod rooms;
pub mod users;

pub use activities::{
    ActiveModel as ActivityActiveModel, Column as ActivityColumn, Entity as Activities,
    Model as Activity,
};
pub use extranet_accesses::{
    AccessRole, AccessStatut, ActiveModel as ExtranetAccessActiveModel,
    Column as ExtranetAccessColumn, Entity as ExtranetAccesses, Model as ExtranetAccess,
};
pub use fonctions::{
    ActiveModel as FonctionActiveModel, Column as FonctionColumn, Entity as Fonctions,
    Model as Fonction,
};
pub use organizations::{
    ActiveModel as OrganizationActiveModel, Column as OrganizationColumn, Entity as Organizations,
    Model as Organization,
};
pub use rooms::{ActiveModel as RoomActiveModel, Column as RoomColumn, Entity as Rooms, Model as Room};
pub use users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as Users, Model as User, UserRole,
};
