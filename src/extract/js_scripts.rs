//! JavaScript evaluation scripts
//!
//! This module contains the JavaScript executed in the rendered document to
//! pull structured signals out of the DOM. Extraction happens in one
//! evaluation so the page is queried exactly once per navigation.

/// Extracts the full page signal: cleaned body text, headings, same-origin
/// links, image/script counts and meta description.
///
/// Boilerplate containers (nav/header/footer/aside plus script/style/
/// noscript/template) are removed from a clone of the body before text is
/// derived, so similarity comparisons see content rather than chrome. Links
/// are restricted to same-origin documents: fragment-only anchors and
/// obvious binary assets are excluded here, and the Rust side re-validates
/// against its own asset list.
pub const PAGE_SIGNAL_SCRIPT: &str = r#"
    (() => {
        const BOILERPLATE = 'nav, header, footer, aside, script, style, noscript, template';
        const BINARY = /\.(pdf|zip|gz|tar|rar|7z|exe|dmg|jpg|jpeg|png|gif|webp|svg|ico|mp3|mp4|webm|avi|mov|wav|doc|docx|xls|xlsx|ppt|pptx|css|js|json|xml|woff|woff2|ttf|eot)(\?|$)/i;

        const clone = document.body ? document.body.cloneNode(true) : null;
        if (clone) {
            clone.querySelectorAll(BOILERPLATE).forEach(el => el.remove());
        }
        const text = clone ? (clone.innerText || clone.textContent || '') : '';
        const cleaned = text.replace(/\s+/g, ' ').trim();

        const headings = [];
        document.querySelectorAll('h1, h2, h3, h4, h5, h6').forEach(h => {
            const t = (h.textContent || '').trim();
            if (t) {
                headings.push({ level: parseInt(h.tagName[1], 10), text: t });
            }
        });

        const origin = window.location.origin;
        const links = [];
        document.querySelectorAll('a[href]').forEach(a => {
            const raw = a.getAttribute('href') || '';
            if (raw.startsWith('#')) return;
            let resolved;
            try {
                resolved = new URL(raw, window.location.href);
            } catch (_) {
                return;
            }
            if (resolved.origin !== origin) return;
            if (BINARY.test(resolved.pathname)) return;

            const block = a.closest('p, li, td, section, article, div');
            links.push({
                href: resolved.href,
                text: (a.textContent || '').trim().slice(0, 200),
                context: block ? (block.textContent || '').trim().slice(0, 300) : ''
            });
        });

        const images = Array.from(document.images);
        const missingAlt = images.filter(img => !(img.alt || '').trim()).length;

        const descTag = document.querySelector('meta[name="description"]')
            || document.querySelector('meta[property="og:description"]');

        return {
            url: window.location.href,
            title: document.title || '',
            text: cleaned,
            word_count: cleaned ? cleaned.split(/\s+/).length : 0,
            headings: headings,
            links: links,
            image_count: images.length,
            images_missing_alt: missingAlt,
            script_count: document.getElementsByTagName('script').length,
            meta_description: descTag ? descTag.getAttribute('content') : null
        };
    })()
"#;
