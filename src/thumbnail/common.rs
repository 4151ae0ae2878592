use super::download::{download, Saved};
use super::session::{wait, Pasted, Presentation, Probe};
use super::utils::{colorize, error_msg, good_msg, message, warn_msg};
use super::youtube::Resolution;
use crate::init::Context;
use crate::Error;
use colored::Color;

/// Extracts the thumbnail of one submitted input, then runs the requested downloads.
pub(super) fn extract(input: &str, context: &mut Context) -> Result<Presentation, Error> {
    message(format!("[extract] Input {input:?}"), context, 3);
    let probe = match context.session.submit(input) {
        Ok(probe) => probe,
        Err(err) => {
            report(&err, context);
            return Err(err);
        }
    };
    finish(probe, context)
}

/// Handles one pasted line.
pub(super) fn paste(text: &str, context: &mut Context) -> Result<(), Error> {
    match context.session.paste(text) {
        Ok(Pasted::Extracting(probe)) => finish(probe, context).map(|_| ()),
        Ok(Pasted::Detected(id)) => {
            good_msg(
                Some("paste"),
                format!("Detected video {id}, enable auto extract to fetch it"),
                context,
            );
            Ok(())
        }
        Ok(Pasted::Ignored) => {
            message(format!("[paste] No video in {text:?}"), context, 3);
            Ok(())
        }
        Err(err) => {
            report(&err, context);
            Err(err)
        }
    }
}

fn finish(probe: Probe, context: &mut Context) -> Result<Presentation, Error> {
    context.spinner.create(" Loading thumbnail");
    let result = wait(probe);
    context.spinner.end();
    let presentation = match result {
        Ok(presentation) if is_shown(&presentation, context) => presentation,
        Ok(_) => {
            report(&Error::Superseded, context);
            return Err(Error::Superseded);
        }
        Err(err) => {
            report(&err, context);
            return Err(err);
        }
    };
    present(&presentation, context)?;
    let mut failed = false;
    for resolution in context.downloads.clone() {
        failed |= save(&presentation, resolution, context).is_err();
    }
    if failed {
        Err(Error::Request)
    } else {
        Ok(presentation)
    }
}

fn is_shown(presentation: &Presentation, context: &Context) -> bool {
    context
        .session
        .board()
        .current()
        .is_some_and(|shown| shown.sequence == presentation.sequence)
}

fn report(err: &Error, context: &mut Context) {
    match err {
        Error::Superseded => warn_msg(Some("thumbnail"), err.to_string(), context),
        err if err.is_input() => error_msg(Some("input"), err.to_string(), context),
        err => error_msg(Some("thumbnail"), err.to_string(), context),
    }
}

fn present(presentation: &Presentation, context: &mut Context) -> Result<(), Error> {
    if context.json {
        let json = serde_json::to_string_pretty(presentation)?;
        context.spinner.stop();
        println!("{json}");
        return Ok(());
    }
    good_msg(
        Some("thumbnail"),
        format!(
            "Video {} ({})",
            presentation.video_id, presentation.resolution
        ),
        context,
    );
    message(format!("  {}", presentation.url), context, 0);
    for (resolution, url) in presentation.urls.iter() {
        message(format!("[urls] {resolution}: {url}"), context, 3);
    }
    for link in &presentation.downloads {
        message(
            format!(
                "  {:<7}{}\n         -> {}",
                link.resolution.tag(),
                link.url,
                link.filename
            ),
            context,
            1,
        );
    }
    Ok(())
}

fn save(
    presentation: &Presentation,
    resolution: Resolution,
    context: &mut Context,
) -> Result<(), Error> {
    let Some(link) = presentation.download(resolution) else {
        return Err(Error::UnknownResolution(resolution.to_string()));
    };
    context.spinner.create(&format!(" Downloading {}", link.filename));
    let result = download(link, context);
    context.spinner.end();
    match result {
        Ok(Saved::File(path)) => {
            good_msg(
                Some("download"),
                format!("Downloaded {}", path.display()),
                context,
            );
            Ok(())
        }
        Ok(Saved::Opened(url)) => {
            warn_msg(
                Some("download"),
                format!("Could not fetch, opened {url} instead"),
                context,
            );
            Ok(())
        }
        Ok(Saved::Printed(url)) => {
            message(
                colorize(
                    Some("download"),
                    &format!("Could not fetch {}, save it from {url}", link.filename),
                    Color::BrightYellow,
                ),
                context,
                -1,
            );
            Ok(())
        }
        Err(Error::AlreadyExists) => {
            warn_msg(
                Some("download"),
                format!("Already exists: {}", link.filename),
                context,
            );
            Ok(())
        }
        Err(err) => {
            error_msg(
                Some("download"),
                format!("Failed to download {}: {err}", link.filename),
                context,
            );
            Err(err)
        }
    }
}
