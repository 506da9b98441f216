//! Static landing page.

/// Landing page HTML, served at `/`.
pub fn index_html() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>OKPets — автозаход для mpets.mobi</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 640px; margin: 3rem auto; padding: 0 1rem; color: #222; }
  h1 { font-size: 1.6rem; }
  .card { border: 1px solid #ddd; border-radius: 8px; padding: 1rem 1.5rem; margin-top: 1rem; }
  code { background: #f4f4f4; padding: 0.1rem 0.3rem; border-radius: 4px; }
</style>
</head>
<body>
<h1>🐾 OKPets</h1>
<p>Чат-бот для ОК, который присматривает за питомцем на mpets.mobi.</p>
<div class="card">
  <p>Напиши боту в ОК:</p>
  <ul>
    <li><code>играть</code>, <code>кормить</code>, <code>выставка</code>, <code>прогулка</code>, <code>поляна</code> — разовые действия</li>
    <li><code>авто</code> — включить автозаход</li>
    <li><code>стоп</code> — выключить автозаход</li>
    <li><code>статус</code> — проверить, работает ли автозаход</li>
  </ul>
</div>
</body>
</html>
"#
}
