//! GET a HAR document over HTTP(S) with libcurl.

use std::time::Duration;

use url::Url;

use crate::error::SourceError;

use super::FetchOptions;

/// Downloads `url` into memory. Follows redirects; any final status outside
/// 2xx is an error. Blocks the current thread for at most `opts.timeout`.
pub(crate) fn fetch(url: &Url, opts: &FetchOptions) -> Result<Vec<u8>, SourceError> {
    let fetch_err = |source: curl::Error| SourceError::Fetch {
        url: url.to_string(),
        source,
    };

    let mut body = Vec::new();
    let mut easy = curl::easy::Easy::new();
    easy.url(url.as_str()).map_err(fetch_err)?;
    easy.follow_location(true).map_err(fetch_err)?;
    easy.max_redirections(opts.max_redirections)
        .map_err(fetch_err)?;
    easy.connect_timeout(opts.connect_timeout.min(opts.timeout))
        .map_err(fetch_err)?;
    // libcurl treats a zero timeout as "never".
    easy.timeout(opts.timeout.max(Duration::from_millis(1)))
        .map_err(fetch_err)?;
    // Let libcurl advertise and undo whatever compression it supports.
    easy.accept_encoding("").map_err(fetch_err)?;
    if let Some(agent) = &opts.user_agent {
        easy.useragent(agent).map_err(fetch_err)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(fetch_err)?;
        transfer.perform().map_err(fetch_err)?;
    }

    let status = easy.response_code().map_err(fetch_err)?;
    if !(200..300).contains(&status) {
        return Err(SourceError::Http {
            url: url.to_string(),
            status,
        });
    }
    tracing::debug!(%url, status, bytes = body.len(), "fetched HAR");
    Ok(body)
}
