pub struct Untagged {
    pub id: String,
}

pub struct TwoKeys {
    #[data(primary_key)]
    pub id: String,
    #[data(primary_key)]
    pub email: String,
}

pub struct NumericKey {
    #[data(primary_key)]
    pub id: u64,
}
