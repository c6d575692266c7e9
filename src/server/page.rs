use super::types::DISCLAIMER;
use std::sync::LazyLock;

static INDEX_PAGE: LazyLock<String> =
    LazyLock::new(|| INDEX_TEMPLATE.replace("{{disclaimer}}", DISCLAIMER));

/// The single-page front end, with the disclaimer filled in.
pub fn index_html() -> &'static str {
    INDEX_PAGE.as_str()
}

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>AI Medical Assistant</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; color: #1f2933; }
  textarea { width: 100%; min-height: 6rem; }
  #preview { max-width: 100%; margin-top: 1rem; display: none; }
  #output { white-space: pre-wrap; background: #f5f7fa; padding: 1rem; border-radius: 6px; min-height: 2rem; }
  .warning { background: #fff4e5; padding: .75rem; border-radius: 6px; }
  .error { color: #b42318; }
  footer { margin-top: 2rem; font-size: .9rem; color: #616e7c; }
</style>
</head>
<body>
<h1>&#129658; Welcome to the AI Medical Assistant</h1>
<p>This assistant analyzes medical images and questions and returns a concise AI-generated interpretation.</p>
<ol>
  <li>Upload a medical image (X-ray, MRI, CT, lab report scan, ...)</li>
  <li>Optionally describe symptoms or ask a question</li>
  <li>Receive a response generated by Gemini</li>
</ol>

<form id="analyze-form">
  <p>
    <label for="file">Upload your medical image</label><br>
    <input id="file" name="file" type="file" accept=".jpg,.jpeg,.png,.bmp,.tiff">
  </p>
  <img id="preview" alt="Uploaded image">
  <p>
    <label for="user_text">Describe symptoms or ask a question (optional with an image):</label><br>
    <textarea id="user_text" name="user_text"></textarea>
  </p>
  <button type="submit">Analyze with AI Assistant</button>
</form>

<h2>Response</h2>
<div id="output"></div>
<p class="warning">&#9888;&#65039; {{disclaimer}}</p>

<footer>Built with Google Gemini.</footer>

<script>
  const form = document.getElementById("analyze-form");
  const output = document.getElementById("output");
  const fileInput = document.getElementById("file");
  const preview = document.getElementById("preview");

  fileInput.addEventListener("change", () => {
    const file = fileInput.files[0];
    if (file) {
      preview.src = URL.createObjectURL(file);
      preview.style.display = "block";
    } else {
      preview.style.display = "none";
    }
  });

  form.addEventListener("submit", async (event) => {
    event.preventDefault();
    output.className = "";
    output.textContent = "Analyzing, please wait...";
    try {
      const response = await fetch("/api/analyze", { method: "POST", body: new FormData(form) });
      const body = await response.json();
      if (response.ok) {
        output.textContent = body.output;
      } else {
        output.className = "error";
        output.textContent = body.error;
      }
    } catch (err) {
      output.className = "error";
      output.textContent = "Request failed: " + err;
    }
  });
</script>
</body>
</html>
"#;
