//! Crate-wide error type.
//!
//! `Display` messages are the short French strings the troop site shows to
//! users; technical detail stays in the error source chain and is only ever
//! logged.

use crate::models::RecordId;

#[derive(Debug, thiserror::Error)]
pub enum PissenlitsError {
    #[error("Erreur d'accès au stockage")]
    Io(#[from] std::io::Error),

    #[error("Données illisibles")]
    Json(#[from] serde_json::Error),

    #[error("Connexion impossible")]
    Http(#[from] reqwest::Error),

    #[error("Impossible d'enregistrer les données")]
    Save(#[source] std::io::Error),

    #[error("Fichier d'import invalide : un tableau JSON est attendu")]
    ImportNotArray,

    #[error("Collecte introuvable")]
    RecordNotFound(RecordId),

    #[error("Opération interrompue")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, PissenlitsError>;
