pub mod answers;

pub mod asks;

pub mod auth;

pub mod courses;

pub mod images;

pub mod invites;

pub mod memberships;

pub mod schools;

pub use answers::configure_answers_routes;
pub use asks::configure_asks_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use images::configure_images_routes;
pub use invites::configure_invites_routes;
pub use memberships::configure_memberships_routes;
pub use schools::configure_schools_routes;
