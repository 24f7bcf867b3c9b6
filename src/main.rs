use clap::Parser;
use comic_translator::common::{decode_areas, encode_areas, EXPORT_FILE_NAME};
use comic_translator::{changelog, cli, config, error, GroupRegistry};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::io::Read;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = Config::load()?;
    if let Some(root) = cli.root.clone() {
        config.storage_root = root;
    }

    let command = cli.command;
    if let Commands::Config { set_root, show } = &command {
        if let Some(root) = set_root {
            config.set_storage_root(root.clone())?;
            println!("✔ 保存先を設定しました");
        }
        if *show {
            println!("設定:");
            println!("  保存先: {}", config.storage_root.display());
            println!("  アップロード上限: {} bytes", config.max_upload_bytes);
            println!("  更新履歴: {}", config.changelog_file.display());
            println!("  設定ファイル: {}", Config::config_path()?.display());
        }
        return Ok(());
    }

    if let Commands::Changelog = &command {
        println!("{}", changelog::load_changelog(&config.changelog_file));
        return Ok(());
    }

    let registry = GroupRegistry::load_all(&config.storage_root).await?;

    match command {
        Commands::List => {
            let groups = registry.list_groups().await?;
            println!("保存先: {}", registry.root().display());
            if groups.is_empty() {
                println!("グループがありません");
            }
            for name in groups {
                match registry.snapshot(&name).await {
                    Some(set) => println!("{}\t{}ファイル\t{}領域", name, set.len(), set.area_count()),
                    None => println!("{}", name),
                }
            }
        }

        Commands::Create { name } => {
            registry.create_group(&name).await?;
            println!("✔ グループを作成しました: {}", name);
        }

        Commands::Delete { name } => {
            registry.delete_group(&name).await?;
            println!("✔ グループを削除しました: {}", name);
        }

        Commands::Rename { old_name, new_name } => {
            registry.rename_group(&old_name, &new_name).await?;
            println!("✔ グループ名を変更しました: {} -> {}", old_name, new_name);
        }

        Commands::Files { group } => {
            for file in registry.list_files(&group).await? {
                let count = registry.get_areas(&group, &file).await.len();
                println!("{}\t{}領域", file, count);
            }
        }

        Commands::Upload { group, files } => {
            for path in files {
                let stored = registry
                    .import_file(&group, &path, config.max_upload_bytes)
                    .await?;
                println!("✔ 追加: {}", stored.display());
            }
        }

        Commands::Show { group, file } => {
            if !registry.contains(&group).await {
                log::warn!("グループが見つかりません: {}", group);
            }
            let areas = registry.get_areas(&group, &file).await;
            println!("{}", encode_areas(&areas)?);
        }

        Commands::Set { group, file, input } => {
            let body = if input == "-" {
                let mut body = String::new();
                std::io::stdin().read_to_string(&mut body)?;
                body
            } else {
                std::fs::read_to_string(&input)?
            };
            let areas = decode_areas(&body)?;
            let count = areas.len();
            registry.set_areas(&group, &file, areas).await?;
            println!("✔ 保存しました: {}/{} ({}領域)", group, file, count);
        }

        Commands::Export { group, output } => {
            let report = match group {
                Some(group) => registry.export_group(&group).await?,
                None => registry.export_all().await,
            };

            match output {
                Some(output) => {
                    let path = if output.is_dir() {
                        output.join(EXPORT_FILE_NAME)
                    } else {
                        output
                    };
                    write_report(&path, &report)?;
                    println!("✔ 出力: {}", path.display());
                }
                None => print!("{}", report),
            }
        }

        Commands::Config { .. } | Commands::Changelog => {}
    }

    Ok(())
}

fn write_report(path: &Path, report: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, report)?;
    Ok(())
}
