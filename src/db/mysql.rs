use crate::config::Config;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};

pub type DbPool = DatabaseConnection;

pub async fn create_mysql_pool(config: &Config) -> Result<DbPool, anyhow::Error> {
    let url = config.mysql_url();
    let db = Database::connect(&url).await?;

    // Schema bootstrap with raw SQL; in production use sea-orm-migration.
    let sql = r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGINT AUTO_INCREMENT PRIMARY KEY,
            email VARCHAR(180) UNIQUE NOT NULL,
            roles JSON NOT NULL,
            password VARCHAR(255) NOT NULL,
            first_name VARCHAR(255) NOT NULL,
            last_name VARCHAR(255) NOT NULL,
            slug VARCHAR(255) NOT NULL,
            picture VARCHAR(255) NULL,
            presentation TEXT NULL
        );

        CREATE TABLE IF NOT EXISTS recipes (
            id BIGINT AUTO_INCREMENT PRIMARY KEY,
            titre VARCHAR(255) UNIQUE NOT NULL,
            date TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            description TEXT NULL,
            etapes TEXT NOT NULL,
            types VARCHAR(255) NULL,
            preptime VARCHAR(255) NULL,
            cooktime VARCHAR(255) NULL,
            `portion` VARCHAR(255) NULL,
            img_recette VARCHAR(255) NULL,
            slug VARCHAR(255) NOT NULL,
            author_id BIGINT NOT NULL,
            FOREIGN KEY (author_id) REFERENCES users(id) ON DELETE CASCADE,
            INDEX idx_author_id (author_id),
            INDEX idx_slug (slug)
        );

        CREATE TABLE IF NOT EXISTS ingredients (
            id BIGINT AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(255) UNIQUE NOT NULL
        );

        CREATE TABLE IF NOT EXISTS recipe_ingredients (
            id BIGINT AUTO_INCREMENT PRIMARY KEY,
            recipe_id BIGINT NOT NULL,
            ingredient_id BIGINT NOT NULL,
            UNIQUE KEY unique_recipe_ingredient (recipe_id, ingredient_id),
            FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE,
            FOREIGN KEY (ingredient_id) REFERENCES ingredients(id) ON DELETE CASCADE,
            INDEX idx_recipe_id (recipe_id),
            INDEX idx_ingredient_id (ingredient_id)
        );

        CREATE TABLE IF NOT EXISTS comments (
            id BIGINT AUTO_INCREMENT PRIMARY KEY,
            rating INT NOT NULL,
            content TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            author_id BIGINT NOT NULL,
            recipe_id BIGINT NOT NULL,
            UNIQUE KEY unique_recipe_author (recipe_id, author_id),
            FOREIGN KEY (author_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE,
            INDEX idx_recipe_id (recipe_id),
            INDEX idx_author_id (author_id)
        );
    "#;

    for statement in sql.split(';') {
        let statement = statement.trim();
        if !statement.is_empty() {
            let stmt = sea_orm::Statement::from_string(
                sea_orm::DatabaseBackend::MySql,
                statement.to_string(),
            );
            db.execute(stmt).await?;
        }
    }

    Ok(db)
}
