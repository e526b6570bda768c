pub mod link;
pub mod packet;
pub mod route;
