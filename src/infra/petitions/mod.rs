mod client;

pub use client::{
    ACTION_FIELD, BACKGROUND_FIELD, DEFAULT_LIMIT, DEFAULT_PETITIONS_URL, PetitionsClient,
    parse_petitions,
};
