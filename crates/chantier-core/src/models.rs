pub mod agency;
pub mod coordinate;
pub mod ids;
pub mod notification;
pub mod user;
pub mod worksite;

pub use agency::Agency;
pub use coordinate::{Coordinate, Located};
pub use ids::{AgencyId, NotificationId, UserId, WorksiteId};
pub use notification::{Notification, NotificationKind};
pub use user::{Role, User};
pub use worksite::{Assignee, Worksite, WorksiteReport, WorksiteStatus};
