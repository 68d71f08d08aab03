pub struct User {
    #[data(primary_key)]
    pub id: String
    pub name: String,
}
