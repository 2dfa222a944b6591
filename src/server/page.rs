//! Embedded single-page UI for asking questions

pub const INDEX_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Ask Your CSV</title>
    <style>
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
            background: #0f172a;
            color: #e2e8f0;
            padding: 20px;
        }

        .container {
            max-width: 760px;
            margin: 0 auto;
        }

        header {
            margin-bottom: 30px;
            padding-bottom: 20px;
            border-bottom: 2px solid #1e293b;
        }

        h1 {
            font-size: 2.2rem;
            background: linear-gradient(135deg, #3b82f6 0%, #8b5cf6 100%);
            -webkit-background-clip: text;
            -webkit-text-fill-color: transparent;
            margin-bottom: 10px;
        }

        .subtitle {
            color: #94a3b8;
            font-size: 1rem;
        }

        .file-badge {
            display: inline-block;
            background: #1e293b;
            border: 1px solid #334155;
            border-radius: 8px;
            padding: 6px 12px;
            margin-bottom: 20px;
            color: #93c5fd;
            font-family: monospace;
        }

        .card {
            background: #1e293b;
            border-radius: 12px;
            padding: 24px;
            border: 1px solid #334155;
            margin-bottom: 20px;
        }

        label {
            display: block;
            font-size: 0.875rem;
            color: #94a3b8;
            text-transform: uppercase;
            letter-spacing: 0.5px;
            margin-bottom: 8px;
        }

        input[type="text"] {
            width: 100%;
            background: #0f172a;
            border: 1px solid #334155;
            border-radius: 8px;
            color: #e2e8f0;
            padding: 12px;
            font-size: 1rem;
            margin-bottom: 16px;
        }

        input[type="text"]:focus {
            outline: none;
            border-color: #3b82f6;
        }

        button {
            background: #3b82f6;
            color: white;
            border: none;
            padding: 10px 20px;
            border-radius: 8px;
            cursor: pointer;
            font-size: 0.875rem;
            font-weight: 600;
            transition: background 0.2s;
        }

        button:hover {
            background: #2563eb;
        }

        button:disabled {
            background: #475569;
            cursor: wait;
        }

        .warning {
            background: #422006;
            border: 1px solid #a16207;
            color: #fde68a;
            border-radius: 8px;
            padding: 16px;
            margin-bottom: 20px;
        }

        .error {
            background: #450a0a;
            border: 1px solid #b91c1c;
            color: #fecaca;
            border-radius: 8px;
            padding: 16px;
            margin-bottom: 20px;
        }

        .answer {
            white-space: pre-wrap;
            line-height: 1.6;
        }

        .spinner {
            color: #94a3b8;
            font-style: italic;
        }

        .hidden {
            display: none;
        }
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1>Ask Your CSV</h1>
            <div class="subtitle">Questions about your class attendance log, answered in plain language</div>
        </header>

        <div id="no-file" class="warning hidden">
            Please provide a 'file' parameter in the URL, for example <code>?file=attendance.csv</code>.
        </div>

        <div id="file-badge" class="file-badge hidden"></div>

        <div id="ask-card" class="card hidden">
            <label for="question">Ask a question about your CSV</label>
            <input type="text" id="question" placeholder="e.g. How many times did Ali attend Math?" autocomplete="off">
            <button id="ask-btn">Ask</button>
        </div>

        <div id="progress" class="card spinner hidden">In progress...</div>
        <div id="error" class="error hidden"></div>
        <div id="answer-card" class="card hidden">
            <label>Answer</label>
            <div id="answer" class="answer"></div>
        </div>
    </div>

    <script>
        const params = new URLSearchParams(window.location.search);
        const file = params.get('file');

        const el = (id) => document.getElementById(id);
        const show = (id) => el(id).classList.remove('hidden');
        const hide = (id) => el(id).classList.add('hidden');

        if (!file) {
            show('no-file');
        } else {
            el('file-badge').textContent = file;
            show('file-badge');
            show('ask-card');
        }

        async function ask() {
            const question = el('question').value.trim();
            if (!question) {
                return;
            }

            el('ask-btn').disabled = true;
            hide('error');
            hide('answer-card');
            show('progress');

            try {
                const resp = await fetch('/api/ask', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ file, question }),
                });
                const body = await resp.json();

                if (!resp.ok) {
                    el('error').textContent = body.error || ('HTTP ' + resp.status);
                    show('error');
                } else {
                    el('answer').textContent = body.answer;
                    show('answer-card');
                }
            } catch (e) {
                el('error').textContent = 'Request failed: ' + e;
                show('error');
            } finally {
                hide('progress');
                el('ask-btn').disabled = false;
            }
        }

        el('ask-btn').addEventListener('click', ask);
        el('question').addEventListener('keydown', (e) => {
            if (e.key === 'Enter') {
                ask();
            }
        });
    </script>
</body>
</html>
"#;
