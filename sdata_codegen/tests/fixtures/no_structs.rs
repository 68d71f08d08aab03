pub enum Role {
    Admin,
    Member,
}

pub fn default_role() -> Role {
    Role::Member
}
