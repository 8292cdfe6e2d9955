//! Confidence scoring shared by every manifest parser.

/// Packages common enough that identifying them is almost certainly right.
pub const POPULAR_PACKAGES: &[&str] = &[
    // python
    "django", "flask", "fastapi", "requests", "pandas", "numpy", "pytest", "sqlalchemy",
    "alembic", "psycopg2", "redis", "celery", "uvicorn",
    // node
    "react", "vue", "angular", "express", "next", "typescript", "jest", "tailwindcss", "axios",
    "lodash", "moment", "webpack", "vite",
    // rust
    "tokio", "serde", "actix-web", "sqlx", "clap", "reqwest",
    // go
    "gin", "echo", "gorilla", "gorm", "testify",
    // tools
    "docker", "git", "npm", "pip", "cargo", "go",
];

/// Manifest file names whose declarations are trusted.
pub const RELIABLE_SOURCES: &[&str] = &[
    "requirements.txt",
    "package.json",
    "pyproject.toml",
    "Cargo.toml",
    "go.mod",
    "Dockerfile",
    "docker-compose.yml",
];

const BASE: f64 = 0.5;
const POPULARITY_BOOST: f64 = 0.3;
const SOURCE_BOOST: f64 = 0.1;

/// Scores a package name found in `source`, clamped to `[0, 1]`.
#[must_use]
pub fn score(name: &str, source: &str) -> f64 {
    let mut confidence = BASE;
    if POPULAR_PACKAGES.contains(&name) {
        confidence += POPULARITY_BOOST;
    }
    if RELIABLE_SOURCES.contains(&source) {
        confidence += SOURCE_BOOST;
    }
    confidence.clamp(0.0, 1.0)
}
