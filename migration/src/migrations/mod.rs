pub mod m202607010001_create_users;
pub mod m202607010002_create_user_roles;
pub mod m202607010003_create_courses;
pub mod m202607010004_create_assignments;
pub mod m202607010005_create_submissions;
