//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::BookmarksService;
use crate::application::ApplicationError;
use crate::cli::args::{AddCommands, Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{node_label, render_subtree, RenderOptions};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };
    if let Commands::Completion { shell } = command {
        return cmd_completion(*shell);
    }

    let settings = Settings::load()?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);
    let file = cli.file.as_deref();

    match command {
        Commands::Init { force } => cmd_init(&container, file, *force),
        Commands::Tree {
            position,
            no_urls,
            no_positions,
        } => cmd_tree(
            &container,
            file,
            position.as_deref(),
            RenderOptions {
                show_urls: container.settings.show_urls && !no_urls,
                show_positions: !no_positions,
            },
        ),
        Commands::Show { position } => cmd_show(&container, file, position),
        Commands::Add { command } => cmd_add(&container, file, command),
        Commands::Edit {
            position,
            title,
            url,
            description,
            keyword,
            expanded,
        } => cmd_edit(
            &container,
            file,
            position,
            NodeEdit {
                title: title.as_deref(),
                url: url.as_deref(),
                description: description.as_deref(),
                keyword: keyword.as_deref(),
                expanded: *expanded,
            },
        ),
        Commands::Remove { position } => cmd_remove(&container, file, position),
        Commands::Move {
            position,
            parent,
            index,
        } => cmd_move(&container, file, position, parent, *index),
        Commands::Search { text } => cmd_search(&container, file, text),
        Commands::Keyword { keyword } => cmd_keyword(&container, file, keyword),
        Commands::Config { command } => cmd_config(&container, command),
        Commands::Completion { .. } => Ok(()),
    }
}

#[instrument]
fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_init(container: &ServiceContainer, file: Option<&Path>, force: bool) -> CliResult<()> {
    let path = container.bookmarks_path(file);
    if container.fs.exists(&path) && !force {
        return Err(ApplicationError::AlreadyExists(path).into());
    }
    let svc = container.empty_bookmarks(file)?;
    svc.save()?;
    output::action("Created", &path.display());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(
    container: &ServiceContainer,
    file: Option<&Path>,
    position: Option<&str>,
    options: RenderOptions,
) -> CliResult<()> {
    let svc = container.bookmarks(file)?;
    let start = svc.resolve(position.unwrap_or("."))?;
    output::info(&render_subtree(svc.tree(), start, options));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, file: Option<&Path>, position: &str) -> CliResult<()> {
    let svc = container.bookmarks(file)?;
    let id = svc.resolve(position)?;
    let node = svc.node(id)?;
    output::field("position", &svc.position_string(id)?);
    output::field("type", &node.kind());
    output::field("title", node.title());
    if node.is_url() {
        output::field("url", node.url());
        output::field("keyword", node.keyword());
    }
    output::field("description", node.description());
    if node.is_folder() || node.is_root() {
        output::field("expanded", &node.is_expanded());
        output::field("children", &node.children().len());
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_add(container: &ServiceContainer, file: Option<&Path>, command: &AddCommands) -> CliResult<()> {
    let mut svc = container.bookmarks(file)?;
    let id = match command {
        AddCommands::Url {
            parent,
            url,
            title,
            description,
            keyword,
            index,
        } => {
            let parent = svc.resolve(parent)?;
            let id = svc.add_url(parent, url, title.as_deref().unwrap_or(url), *index)?;
            let node = svc.node_mut(id)?;
            if let Some(description) = description {
                node.set_description(description.as_str());
            }
            if let Some(keyword) = keyword {
                warn_on_keyword_clash(&svc, keyword);
                svc.node_mut(id)?.set_keyword(keyword.as_str());
            }
            id
        }
        AddCommands::Folder {
            parent,
            title,
            index,
        } => {
            let parent = svc.resolve(parent)?;
            svc.add_folder(parent, title, *index)?
        }
        AddCommands::Separator { parent, index } => {
            let parent = svc.resolve(parent)?;
            svc.add_separator(parent, *index)?
        }
    };
    svc.save()?;
    output::action("Added", &svc.position_string(id)?);
    Ok(())
}

fn warn_on_keyword_clash(svc: &BookmarksService, keyword: &str) {
    if let Some(existing) = svc.search_keyword(keyword) {
        if let Ok(position) = svc.position_string(existing) {
            output::warning(&format!(
                "keyword '{keyword}' is already used by [{position}], lookups return the first match"
            ));
        }
    }
}

/// Field updates for `edit`; `None` leaves a field unchanged.
#[derive(Debug)]
struct NodeEdit<'a> {
    title: Option<&'a str>,
    url: Option<&'a str>,
    description: Option<&'a str>,
    keyword: Option<&'a str>,
    expanded: Option<bool>,
}

#[instrument(skip(container))]
fn cmd_edit(
    container: &ServiceContainer,
    file: Option<&Path>,
    position: &str,
    edit: NodeEdit<'_>,
) -> CliResult<()> {
    let mut svc = container.bookmarks(file)?;
    let id = svc.resolve(position)?;
    if let Some(keyword) = edit.keyword {
        if svc.search_keyword(keyword).is_some_and(|other| other != id) {
            warn_on_keyword_clash(&svc, keyword);
        }
    }
    let node = svc.node_mut(id)?;
    if let Some(title) = edit.title {
        node.set_title(title);
    }
    if let Some(url) = edit.url {
        node.set_url(url);
    }
    if let Some(description) = edit.description {
        node.set_description(description);
    }
    if let Some(keyword) = edit.keyword {
        node.set_keyword(keyword);
    }
    if let Some(expanded) = edit.expanded {
        node.set_expanded(expanded);
    }
    svc.save()?;
    output::action("Updated", position);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_remove(container: &ServiceContainer, file: Option<&Path>, position: &str) -> CliResult<()> {
    let mut svc = container.bookmarks(file)?;
    let id = svc.resolve(position)?;
    let removed = svc.remove_bookmark(id)?;
    svc.save()?;
    output::action("Removed", &format!("{position} ({removed} node(s))"));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_move(
    container: &ServiceContainer,
    file: Option<&Path>,
    position: &str,
    parent: &str,
    index: Option<usize>,
) -> CliResult<()> {
    let mut svc = container.bookmarks(file)?;
    let id = svc.resolve(position)?;
    let target = svc.resolve(parent)?;
    svc.move_bookmark(id, target, index)?;
    svc.save()?;
    output::action("Moved", &format!("{position} -> {}", svc.position_string(id)?));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_search(container: &ServiceContainer, file: Option<&Path>, text: &str) -> CliResult<()> {
    let svc = container.bookmarks(file)?;
    let hits = svc.search(text);
    if hits.is_empty() {
        return Err(CliError::NotFound(format!("no bookmark matches '{text}'")));
    }
    for id in hits {
        let node = svc.node(id)?;
        output::hit(&svc.position_string(id)?, &node_label(node, true));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_keyword(container: &ServiceContainer, file: Option<&Path>, keyword: &str) -> CliResult<()> {
    let svc = container.bookmarks(file)?;
    let id = svc
        .search_keyword(keyword)
        .ok_or_else(|| CliError::NotFound(format!("no bookmark with keyword '{keyword}'")))?;
    output::info(svc.node(id)?.url());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&path.display()),
                None => output::warning("no config directory on this platform"),
            }
            Ok(())
        }
        ConfigCommands::Init => {
            let path = global_config_path().ok_or_else(|| {
                CliError::InvalidArgs("no config directory on this platform".to_string())
            })?;
            if container.fs.exists(&path) {
                return Err(InfraError::ConfigExists(path).into());
            }
            container
                .fs
                .ensure_parent(&path)
                .and_then(|()| container.fs.write(&path, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}
