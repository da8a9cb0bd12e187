pub(crate) mod team_name;
pub(crate) mod username;
