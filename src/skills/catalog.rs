//! Compiled-in skill database and alias table.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::SkillCategory::{
    self, Build, Cloud, Database, Devops, Framework, Language, Monitoring, Orm, PackageManager,
    Testing, Utility,
};

/// One known skill: canonical name, category and alternate spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Canonical skill name.
    pub name: &'static str,
    /// Category the skill belongs to.
    pub category: SkillCategory,
    /// Alternate spellings resolving to `name`.
    pub aliases: &'static [&'static str],
}

const fn entry(
    name: &'static str,
    category: SkillCategory,
    aliases: &'static [&'static str],
) -> CatalogEntry {
    CatalogEntry { name, category, aliases }
}

/// Every known skill. Names are unique.
pub static CATALOG: &[CatalogEntry] = &[
    // languages; the build-tool `typescript` and package-manager `go` entries are folded
    // into these two as aliases
    entry("python", Language, &["py", "python3"]),
    entry("javascript", Language, &["js", "node"]),
    entry("typescript", Language, &["ts", "ts-compiler"]),
    entry("rust", Language, &["rs"]),
    entry("go", Language, &["golang", "golang-mod"]),
    entry("java", Language, &[]),
    entry("c#", Language, &["csharp", "dotnet"]),
    entry("php", Language, &[]),
    entry("ruby", Language, &["rb"]),
    entry("swift", Language, &[]),
    entry("kotlin", Language, &["kt"]),
    entry("scala", Language, &[]),
    // python frameworks
    entry("django", Framework, &["djangoproject"]),
    entry("flask", Framework, &["flask-app"]),
    entry("fastapi", Framework, &["fast-api"]),
    entry("uvicorn", Framework, &["asgi"]),
    entry("gunicorn", Framework, &["wsgi"]),
    entry("tornado", Framework, &[]),
    entry("aiohttp", Framework, &["async-http"]),
    entry("starlette", Framework, &[]),
    entry("bottle", Framework, &[]),
    entry("pyramid", Framework, &[]),
    // js frameworks
    entry("react", Framework, &["reactjs", "react.js"]),
    entry("vue", Framework, &["vuejs", "vue.js"]),
    entry("angular", Framework, &["angularjs"]),
    entry("next", Framework, &["nextjs", "next.js"]),
    entry("nuxt", Framework, &["nuxtjs", "nuxt.js"]),
    entry("express", Framework, &["expressjs", "express.js"]),
    entry("koa", Framework, &["koajs"]),
    entry("nest", Framework, &["nestjs"]),
    entry("svelte", Framework, &["sveltejs"]),
    entry("ember", Framework, &["emberjs"]),
    entry("backbone", Framework, &["backbonejs"]),
    // rust frameworks
    entry("actix-web", Framework, &["actix"]),
    entry("rocket", Framework, &["rocket-rs"]),
    entry("warp", Framework, &["warp-rs"]),
    entry("axum", Framework, &["axum-rs"]),
    entry("tonic", Framework, &["grpc-rs"]),
    // go frameworks
    entry("gin", Framework, &["gin-gonic"]),
    entry("echo", Framework, &["echo-framework"]),
    entry("gorilla", Framework, &["gorilla-mux"]),
    entry("fiber", Framework, &["fiber-go"]),
    entry("chi", Framework, &["chi-router"]),
    // databases
    entry("postgresql", Database, &["postgres", "psql"]),
    entry("mysql", Database, &["mariadb"]),
    entry("sqlite", Database, &["sqlite3"]),
    entry("mongodb", Database, &["mongo"]),
    entry("redis", Database, &["redis-py"]),
    entry("cassandra", Database, &["cassandra-db"]),
    entry("elasticsearch", Database, &["elastic", "es"]),
    entry("influxdb", Database, &["influx"]),
    entry("neo4j", Database, &["neo4j-db"]),
    entry("dynamodb", Database, &["aws-dynamodb"]),
    // orms
    entry("sqlalchemy", Orm, &["sql-alchemy"]),
    entry("alembic", Orm, &["db-migration"]),
    entry("prisma", Orm, &["prisma-client"]),
    entry("sequelize", Orm, &["sequelize-orm"]),
    entry("typeorm", Orm, &["type-orm"]),
    entry("gorm", Orm, &["gorm-go"]),
    entry("sqlx", Orm, &["sqlx-rs"]),
    entry("diesel", Orm, &["diesel-rs"]),
    // testing
    entry("pytest", Testing, &["py-test"]),
    entry("unittest", Testing, &["python-testing"]),
    entry("jest", Testing, &["jest-testing"]),
    entry("mocha", Testing, &["mocha-testing"]),
    entry("cypress", Testing, &["cypress-testing"]),
    entry("playwright", Testing, &["playwright-testing"]),
    entry("selenium", Testing, &["selenium-testing"]),
    entry("testify", Testing, &["testify-go"]),
    entry("criterion", Testing, &["criterion-rs"]),
    // build tools
    entry("webpack", Build, &["webpack-bundler"]),
    entry("vite", Build, &["vite-bundler"]),
    entry("rollup", Build, &["rollup-bundler"]),
    entry("parcel", Build, &["parcel-bundler"]),
    entry("esbuild", Build, &["es-build"]),
    entry("babel", Build, &["babel-transpiler"]),
    entry("swc", Build, &["swc-compiler"]),
    // package managers
    entry("npm", PackageManager, &["node-package-manager"]),
    entry("yarn", PackageManager, &["yarn-pkg"]),
    entry("pnpm", PackageManager, &["pnpm-pkg"]),
    entry("pip", PackageManager, &["python-pip"]),
    entry("poetry", PackageManager, &["poetry-python"]),
    entry("cargo", PackageManager, &["rust-cargo"]),
    // cloud
    entry("aws", Cloud, &["amazon-web-services"]),
    entry("azure", Cloud, &["microsoft-azure"]),
    entry("gcp", Cloud, &["google-cloud", "google-cloud-platform"]),
    entry("heroku", Cloud, &["heroku-platform"]),
    entry("vercel", Cloud, &["vercel-platform"]),
    entry("netlify", Cloud, &["netlify-platform"]),
    entry("digitalocean", Cloud, &["do", "digital-ocean"]),
    // devops
    entry("docker", Devops, &["docker-container"]),
    entry("kubernetes", Devops, &["k8s", "kube"]),
    entry("terraform", Devops, &["terraform-iac"]),
    entry("ansible", Devops, &["ansible-automation"]),
    entry("jenkins", Devops, &["jenkins-ci"]),
    entry("github-actions", Devops, &["github-ci"]),
    entry("gitlab-ci", Devops, &["gitlab-pipeline"]),
    entry("circleci", Devops, &["circle-ci"]),
    entry("travis", Devops, &["travis-ci"]),
    // monitoring
    entry("prometheus", Monitoring, &["prometheus-metrics"]),
    entry("grafana", Monitoring, &["grafana-dashboard"]),
    entry("datadog", Monitoring, &["datadog-apm"]),
    entry("newrelic", Monitoring, &["new-relic"]),
    entry("sentry", Monitoring, &["sentry-error-tracking"]),
    entry("logstash", Monitoring, &["elastic-logstash"]),
    entry("fluentd", Monitoring, &["fluent-d"]),
    // utilities
    entry("requests", Utility, &["python-requests"]),
    entry("axios", Utility, &["axios-http"]),
    entry("lodash", Utility, &["lodash-js"]),
    entry("moment", Utility, &["moment-js"]),
    entry("pandas", Utility, &["pandas-data"]),
    entry("numpy", Utility, &["numpy-array"]),
    entry("matplotlib", Utility, &["matplotlib-plot"]),
    entry("seaborn", Utility, &["seaborn-viz"]),
    entry("scikit-learn", Utility, &["sklearn", "scikit"]),
    entry("tensorflow", Utility, &["tf", "tensor-flow"]),
    entry("pytorch", Utility, &["torch", "py-torch"]),
];

const POPULAR_SKILLS: &[&str] = &[
    "python", "javascript", "react", "django", "docker", "postgresql", "typescript", "fastapi",
    "vue", "express", "redis", "pytest", "next", "flask", "mongodb", "jest", "webpack",
    "kubernetes", "aws", "terraform", "prometheus", "grafana",
];

/// Lower-cases and drops `-`, `_` and `.`, the form every lookup key takes.
pub(super) fn lookup_key(name: &str) -> String {
    name.to_lowercase().chars().filter(|c| !matches!(c, '-' | '_' | '.')).collect()
}

/// Lookup key (canonical name or alias) to catalog entry. Canonical names
/// are inserted first so an alias never shadows one.
static INDEX: LazyLock<HashMap<String, &'static CatalogEntry>> = LazyLock::new(|| {
    let mut index = HashMap::new();
    for entry in CATALOG {
        index.insert(lookup_key(entry.name), entry);
    }
    for entry in CATALOG {
        for alias in entry.aliases {
            index.entry(lookup_key(alias)).or_insert(entry);
        }
    }
    index
});

/// Finds the catalog entry a name or alias resolves to.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static CatalogEntry> {
    INDEX.get(&lookup_key(name)).copied()
}

/// Distinct categories present in the catalog, sorted by name.
#[must_use]
pub fn categories() -> Vec<SkillCategory> {
    let mut categories: Vec<SkillCategory> = CATALOG.iter().map(|e| e.category).collect();
    categories.sort_unstable_by_key(|c| c.as_str());
    categories.dedup();
    categories
}

/// The first `limit` entries of a fixed popularity ranking.
#[must_use]
pub fn popular_skills(limit: usize) -> Vec<&'static str> {
    POPULAR_SKILLS.iter().take(limit).copied().collect()
}
