mod agencies;
mod auth;
mod health;
mod notifications;
mod users;
mod worksites;

pub use agencies::{agency_staff, agency_worksites, list_agencies, nearby_agencies};
pub use auth::login;
pub use health::health_check;
pub use notifications::{list_notifications, mark_read, unread_count};
pub use users::get_user;
pub use worksites::{
    assign_worksite, check_proximity, list_worksites, nearby_worksites, report_worksite,
    worksites_geojson,
};
