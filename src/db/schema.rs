//! SQL DDL for the two storage roles. Both scripts are idempotent and run
//! every time a storage handle is opened.

/// Operator accounts. `senha` holds an encoded PBKDF2 hash, never plaintext.
pub const CREDENTIALS_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS login (
    usuario TEXT PRIMARY KEY NOT NULL,
    senha TEXT NOT NULL
);
"#;

/// Patient records. Data columns are nullable; rows that do not decode into a
/// full `Patient` are skipped by the listing.
pub const PATIENTS_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS pacientes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nome TEXT NULL,
    cpf TEXT NULL,
    idade INTEGER NULL,
    sexo TEXT NULL,
    fuma TEXT NULL,
    alcool TEXT NULL
);

CREATE INDEX IF NOT EXISTS idx_pacientes_nome ON pacientes(nome);
"#;
