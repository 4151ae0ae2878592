use super::session::DownloadLink;
use super::utils::{message, write_file};
use crate::init::{external::External, Context};
use crate::Error;
use std::path::PathBuf;

#[derive(Debug, PartialEq)]
pub(crate) enum Saved {
    File(PathBuf),
    /// Fetching failed, the URL was handed to the system opener instead.
    Opened(String),
    /// Fetching failed and nothing could open the URL.
    Printed(String),
}

pub(crate) fn download(link: &DownloadLink, context: &mut Context) -> Result<Saved, Error> {
    let path = context.output_dir.join(&link.filename);
    if path.exists() {
        return Err(Error::AlreadyExists);
    }
    message(format!("[download] GET {}", link.url), context, 3);
    let fetched = context.session.cdn().fetch(&link.url);
    match fetched {
        Ok(bytes) => {
            write_file(&path, &bytes)?;
            Ok(Saved::File(path))
        }
        Err(err) => {
            message(
                format!("[download] Fetching {} failed: {err}", link.url),
                context,
                3,
            );
            fallback(&link.url, context)
        }
    }
}

fn fallback(url: &str, context: &mut Context) -> Result<Saved, Error> {
    if !context.open_fallback {
        return Ok(Saved::Printed(url.to_string()));
    }
    if context.missing.contains(&External::Opener) {
        message(
            format!("[download] {} is not installed", External::Opener.command()),
            context,
            2,
        );
        return Ok(Saved::Printed(url.to_string()));
    }
    External::Opener.open(url)?;
    Ok(Saved::Opened(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thumbnail::cdn::fake::FakeCdn;
    use crate::thumbnail::youtube::Resolution;
    use std::sync::Arc;

    fn link(url: &str, filename: &str) -> DownloadLink {
        DownloadLink {
            resolution: Resolution::Hq,
            url: url.to_string(),
            filename: filename.to_string(),
        }
    }

    #[test]
    fn saves_under_the_suggested_filename() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg";
        let mut context = Context::detached(Arc::new(FakeCdn::serving([url])), dir.path());
        let link = link(url, "thumb-hq.jpg");

        let path = dir.path().join("thumb-hq.jpg");
        assert_eq!(download(&link, &mut context), Ok(Saved::File(path.clone())));
        assert_eq!(std::fs::read(&path).unwrap(), format!("jpeg:{url}").into_bytes());
        assert_eq!(download(&link, &mut context), Err(Error::AlreadyExists));
    }

    #[test]
    fn failed_fetch_falls_back_to_the_url() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg";
        let mut context = Context::detached(Arc::new(FakeCdn::default()), dir.path());
        let result = download(&link(url, "thumb-maxres.jpg"), &mut context);
        assert_eq!(result, Ok(Saved::Printed(url.to_string())));
        assert!(!dir.path().join("thumb-maxres.jpg").exists());
    }

    #[test]
    fn missing_opener_prints_the_url() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://img.youtube.com/vi/dQw4w9WgXcQ/sddefault.jpg";
        let mut context = Context::detached(Arc::new(FakeCdn::default()), dir.path());
        context.open_fallback = true;
        context.missing = vec![External::Opener];
        let result = download(&link(url, "thumb-sd.jpg"), &mut context);
        assert_eq!(result, Ok(Saved::Printed(url.to_string())));
    }
}
