//! Console entry point for the Lumium Studio core.
//!
//! The browser UI is a separate front end; this binary drives the same
//! session over a line-oriented chat so the core can be used and exercised
//! end to end from a terminal.

use std::io::Write as _;
use std::sync::Arc;

use lumium_studio::{
    config::{EngineSelector, GenerationConfig, Settings},
    error::AppError,
    gateway::{Gateway, GenerativeBackend, HttpGenerativeClient},
    media::UploadedImage,
    output::ImageWriter,
    profiles::{AdditionalStyle, ConsistencyMode, ProfileStore},
    session::Session,
    storage::{keys, FileStore, KeyValueStore},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    settings.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone()));
    if settings.logging.format == "json" {
        tracing_subscriber::registry().with(filter).with(fmt::layer().json()).init();
    } else {
        tracing_subscriber::registry().with(filter).with(fmt::layer()).init();
    }

    info!("Starting Lumium Studio console");

    let api_key = settings
        .api
        .key
        .clone()
        .or_else(|| std::env::var("GEMINI_API_KEY").ok())
        .ok_or_else(|| anyhow::anyhow!("Defina GEMINI_API_KEY ou api.key na configuração"))?;

    let client = Arc::new(HttpGenerativeClient::new(&settings.api, api_key)?);
    let backend: Arc<dyn GenerativeBackend> = client.clone();
    let gateway = Gateway::new(
        backend,
        settings.api.text_model.clone(),
        settings.api.image_model.clone(),
    );

    // Restore persisted chat defaults; a broken state file falls back to the
    // configured defaults but is reported.
    let store = FileStore::new(&settings.storage.state_file);
    let generation = match store.get::<GenerationConfig>(keys::GENERATION_CONFIG) {
        Ok(Some(config)) => config,
        Ok(None) => settings.generation.clone(),
        Err(e) => {
            warn!(error = %e, "Could not restore generation config");
            settings.generation.clone()
        }
    };

    let profiles = Arc::new(ProfileStore::new());
    let session = Session::new(gateway, profiles.clone(), generation, &settings.photoshoot);
    let writer = ImageWriter::new(&settings.storage.base_path);

    println!("Lumium Studio - digite um prompt, ou :ajuda para comandos.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else { break };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if line == ":sair" || line == ":quit" {
            break;
        }
        if line == ":ajuda" {
            print_help();
            continue;
        }
        if let Some(rest) = line.strip_prefix(":perfil ") {
            if let Err(e) = handle_profile_command(&profiles, rest).await {
                println!("Erro: {}", e);
            }
            continue;
        }
        if let Some(rest) = line.strip_prefix(":motor ") {
            match parse_engine(rest.trim()) {
                Some(engine) => {
                    let mut config = session.generation_config();
                    config.engine = engine;
                    session.set_generation_config(config.clone());
                    if let Err(e) = store.set(keys::GENERATION_CONFIG, &config) {
                        warn!(error = %e, "Could not persist generation config");
                    }
                    println!("Motor ativo: {:?}", engine);
                }
                None => println!("Motores: auto, texto, imagem, editor, busca"),
            }
            continue;
        }
        if let Some(key) = line.strip_prefix(":chave ") {
            if client.submit_new_key(&settings.api.text_model, key.trim()).await {
                println!("Nova chave aceita.");
            } else {
                println!("A chave informada não é utilizável.");
            }
            continue;
        }

        let outcome = session.send(&line).await;
        if let Some(message) = session.log().get(&outcome.message_id) {
            println!("{}", message.text);
            if !message.images.is_empty() {
                match writer.save_all(&message.images).await {
                    Ok(paths) => {
                        for path in paths {
                            println!("Imagem salva em {}", path.display());
                        }
                    }
                    Err(e) => println!("Erro ao salvar imagens: {}", e),
                }
            }
        }
        match outcome.error {
            Some(AppError::QuotaExceeded) | Some(AppError::InvalidApiKey) => {
                println!("Use :chave <nova-chave> para continuar.");
            }
            _ => {}
        }
    }

    info!("Session finished");
    Ok(())
}

fn print_help() {
    println!(
        ":perfil add <nome> [normal|profissional|amador|realidade] <arquivos...>\n\
         :perfil list\n\
         :perfil rm <nome>\n\
         :motor <auto|texto|imagem|editor|busca>\n\
         :chave <nova-chave-de-api>\n\
         :sair"
    );
}

fn parse_engine(word: &str) -> Option<EngineSelector> {
    match word {
        "auto" => Some(EngineSelector::Auto),
        "texto" => Some(EngineSelector::Text),
        "imagem" => Some(EngineSelector::ImageGeneration),
        "editor" => Some(EngineSelector::ProfileEditor),
        "busca" => Some(EngineSelector::GroundedSearch),
        _ => None,
    }
}

async fn handle_profile_command(profiles: &ProfileStore, rest: &str) -> anyhow::Result<()> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    match tokens.as_slice() {
        ["list"] => {
            for profile in profiles.list() {
                println!(
                    "{} ({:?}, {} imagens)",
                    profile.name,
                    profile.consistency_mode,
                    profile.images.len()
                );
            }
            Ok(())
        }
        ["rm", name] => {
            if let Some(profile) = profiles.get_by_name(name) {
                profiles.delete(&profile.id);
                println!("Perfil '{}' removido.", name);
            } else {
                println!("Perfil '{}' não encontrado.", name);
            }
            Ok(())
        }
        ["add", name, rest @ ..] if !rest.is_empty() => {
            let (mode, files) = match rest[0] {
                "normal" => (ConsistencyMode::Normal, &rest[1..]),
                "profissional" => (ConsistencyMode::Professional, &rest[1..]),
                "amador" => (ConsistencyMode::Amateur, &rest[1..]),
                "realidade" => (ConsistencyMode::PhotographicReality, &rest[1..]),
                _ => (ConsistencyMode::Normal, rest),
            };
            let mut images = Vec::new();
            for file in files {
                images.push(UploadedImage::from_file(file).await?);
            }
            let profile =
                profiles.create(name, images, mode, AdditionalStyle::None, None, None, None)?;
            println!("Perfil '{}' criado. Mencione o nome em um prompt para usá-lo.", profile.name);
            Ok(())
        }
        _ => {
            println!("Uso: :perfil add <nome> [modo] <arquivos...> | :perfil list | :perfil rm <nome>");
            Ok(())
        }
    }
}
