pub mod engagementmodel;
pub mod jobmodel;
pub mod messagemodel;
pub mod questionmodel;
pub mod reviewmodel;
pub mod usermodel;
