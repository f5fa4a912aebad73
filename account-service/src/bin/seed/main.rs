use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::user::errors::UserError;
use account_service::domain::user::models::CreateUserCommand;
use account_service::domain::user::models::EmailAddress;
use account_service::domain::user::models::NewAddress;
use account_service::domain::user::ports::UserServicePort;
use account_service::domain::user::service::UserService;
use account_service::outbound::repositories::PostgresUserRepository;
use auth::Authenticator;
use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const USERS_TO_SEED: usize = 50;

const FIRST_NAMES: &[&str] = &[
    "Ana", "Bruno", "Carla", "Diego", "Elisa", "Felipe", "Gabriela", "Heitor", "Isabela",
    "João", "Larissa", "Marcos", "Natália", "Otávio", "Paula", "Rafael", "Sofia", "Thiago",
    "Vitória", "William",
];

const LAST_NAMES: &[&str] = &[
    "Almeida", "Barbosa", "Cardoso", "Dias", "Fernandes", "Gomes", "Lima", "Martins",
    "Nascimento", "Oliveira", "Pereira", "Ribeiro", "Santos", "Silva", "Souza",
];

const CITIES: &[(&str, &str)] = &[
    ("São Paulo", "SP"),
    ("Rio de Janeiro", "RJ"),
    ("Belo Horizonte", "MG"),
    ("Curitiba", "PR"),
    ("Porto Alegre", "RS"),
    ("Recife", "PE"),
];

const STREETS: &[&str] = &[
    "Rua das Flores",
    "Avenida Brasil",
    "Rua XV de Novembro",
    "Avenida Paulista",
    "Rua da Consolação",
];

fn random_password(rng: &mut impl Rng) -> String {
    let tail: String = std::iter::repeat_with(|| char::from(rng.sample(Alphanumeric)))
        .take(8)
        .collect();

    // Always satisfies the letter and digit rules regardless of the random tail
    format!("a{}{}", rng.gen_range(0..10), tail)
}

fn random_birth_date(rng: &mut impl Rng) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        rng.gen_range(1950..=2005),
        rng.gen_range(1..=12),
        rng.gen_range(1..=28)
    )
}

fn random_address(rng: &mut impl Rng) -> NewAddress {
    let (city, state) = CITIES.choose(rng).copied().unwrap_or(("São Paulo", "SP"));

    NewAddress {
        cep: format!("{:05}-{:03}", rng.gen_range(0..100_000), rng.gen_range(0..1_000)),
        street: STREETS.choose(rng).copied().unwrap_or("Rua A").to_string(),
        street_number: rng.gen_range(1..=3000),
        complement: rng
            .gen_bool(0.3)
            .then(|| format!("Apto {}", rng.gen_range(1..=300))),
        neighborhood: "Centro".to_string(),
        city: city.to_string(),
        state: state.to_string(),
    }
}

fn random_user(index: usize, rng: &mut impl Rng) -> Result<CreateUserCommand, UserError> {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Ana");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Silva");
    let email = EmailAddress::new(format!("user{}.{}@example.com", index, rng.gen::<u32>()))?;
    let addresses = (0..rng.gen_range(0..=2))
        .map(|_| random_address(rng))
        .collect();

    Ok(CreateUserCommand {
        name: format!("{} {}", first, last),
        email,
        password: random_password(rng),
        birth_date: random_birth_date(rng),
        addresses,
    })
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info,account_service=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pg_pool).await?;

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let user_service = UserService::new(
        Arc::new(PostgresUserRepository::new(pg_pool)),
        authenticator,
        config.jwt.session_policy(),
    );

    let mut rng = rand::thread_rng();
    for index in 0..USERS_TO_SEED {
        let command = random_user(index, &mut rng)?;
        let user = user_service.create_user(command).await?;
        tracing::debug!(user_id = %user.id, name = %user.name, "Seeded user");
    }

    tracing::info!(count = USERS_TO_SEED, "Seeding completed");

    Ok(())
}
