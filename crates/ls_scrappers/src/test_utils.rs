//! HTML fixtures shaped like the Practica Español templates.

pub const LISTING_HTML: &str = r#"
<html><body>
    <h3 class="entry-title"><a href="https://practiceespanol.com/news/uno/">Uno</a></h3>
    <h3 class="elementor-post__title"><a href="/news/dos/">Dos</a></h3>
    <h3 class="entry-title"><a>Sin enlace</a></h3>
    <h2 class="entry-title"><a href="/news/no-es-articulo/">Otro</a></h2>
    <h3 class="entry-title"><a href="/news/tres/">Tres</a></h3>
</body></html>
"#;

pub const ARTICLE_HTML: &str = r#"
<html><body>
    <h1 class="entry-title">  ¡Hola, Mundo! 2024 </h1>
    <div class="entry-content">
        <div class="wp-block-columns is-layout-flex">
            <div class="wp-block-column is-layout-flow">
                <h2>Spanish News</h2>
                <p> Primer párrafo. </p>
                <p>Segundo párrafo.</p>
            </div>
            <div class="wp-block-column is-layout-flow">
                <h2>English Translation</h2>
                <p>First paragraph.</p>
                <p>Second paragraph.</p>
            </div>
        </div>
    </div>
</body></html>
"#;

pub const WIDGET_ARTICLE_HTML: &str = r#"
<html><body>
    <div data-widget_type="theme-post-content.default">
        <div class="wp-block-column"><h2>Spanish news</h2><p>Hace sol hoy.</p></div>
        <div class="wp-block-column"><h2>Vocabulary</h2><p>sol: sun</p></div>
    </div>
</body></html>
"#;

pub const NO_CONTAINER_HTML: &str = r#"
<html><body>
    <h1 class="entry-title">Sin contenedor</h1>
    <main>
        <div class="wp-block-column"><h2>Spanish News</h2><p>Perdido.</p></div>
    </main>
</body></html>
"#;

pub const EMPTY_SOURCE_HTML: &str = r#"
<html><body>
    <h1 class="entry-title">Solo inglés</h1>
    <div class="entry-content">
        <div class="wp-block-column"><h2>Spanish News</h2><p>   </p></div>
        <div class="wp-block-column"><h2>English Translation</h2><p>Only English.</p></div>
    </div>
</body></html>
"#;

/// Heading on the row wrapper, paragraphs in an unlabelled inner column.
pub const WRAPPER_HEADING_HTML: &str = r#"
<html><body>
    <h1 class="entry-title">Texto</h1>
    <div class="entry-content">
        <div class="wp-block-columns">
            <h2>Spanish News</h2>
            <div class="wp-block-column"><p>Texto.</p></div>
        </div>
    </div>
</body></html>
"#;
