//! Shared helpers for working with `figment::Jail` in tests.
//!
//! A jail runs its closure in a fresh temporary directory, so loader tests
//! can create and read files by relative path without touching the real
//! working directory.

use anyhow::{Result, anyhow};
use config_node::{ConfigurationLoader, ConfigurationTree, FileLoader};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down once the closure completes, even when it fails.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure returns a
/// [`figment::Error`].
///
/// # Examples
///
/// ```
/// use config_node::{ConfigurationLoader, FileLoader};
/// use test_helpers::with_jail;
///
/// let port = with_jail(|jail| {
///     jail.create_file("app.json", r#"{"port": 8080}"#)?;
///     let tree = FileLoader::new("app.json")?.load()?;
///     Ok(tree.root().node(["port"]).get_int())
/// })?;
/// assert_eq!(port, Some(8080));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts any error implementing [`ToString`] into a [`figment::Error`].
///
/// Lets jail closures use `?` on `anyhow` and I/O results.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers own the error and pass it straight from map_err"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}

/// Writes `contents` to `name` inside `jail` and returns a loader for it.
///
/// The format follows the file's extension, as with [`FileLoader::new`].
///
/// # Errors
///
/// Returns an error if the file cannot be written or its extension names no
/// supported format.
pub fn loader_with_file(
    jail: &mut figment::Jail,
    name: &str,
    contents: &str,
) -> figment::error::Result<FileLoader> {
    jail.create_file(name, contents)?;
    Ok(FileLoader::new(name)?)
}

/// Loads `contents` as the file `name` inside a fresh jail.
///
/// # Errors
///
/// Returns an error if the file cannot be written, parsed or loaded.
///
/// # Examples
///
/// ```
/// use test_helpers::load_jailed;
///
/// let tree = load_jailed("app.json", r#"{"port": 8080}"#)?;
/// assert_eq!(tree.root().node(["port"]).get_int(), Some(8080));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn load_jailed(name: &str, contents: &str) -> Result<ConfigurationTree> {
    with_jail(|jail| Ok(loader_with_file(jail, name, contents)?.load()?))
}
